use crate::cli::InfoArgs;
use crate::error::Result;
use densfit::chem::ElementTable;
use densfit::models::structure::{Structure, StructureError};
use std::collections::HashSet;
use tracing::{info, warn};

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Reading '{}'.", args.input.display());
    let structure = Structure::from_path(&args.input)?;
    let elements = match &args.elements {
        Some(path) => ElementTable::from_toml_path(path)?,
        None => ElementTable::new(),
    };

    let models: HashSet<i32> = structure.table().models().iter().copied().collect();
    println!("Atoms:     {}", structure.natoms());
    println!("Models:    {}", models.len());
    println!("Chains:    {}", structure.chain_list().join(" "));
    println!("Residues:  {}", structure.sequence().len());

    match structure.centre_of_mass(&elements) {
        Ok(com) => println!("Centre of mass: {:8.3} {:8.3} {:8.3}", com.x, com.y, com.z),
        Err(StructureError::Empty) => {}
        Err(err @ StructureError::UnknownElement { .. }) => {
            warn!("{err}; skipping centre of mass.");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn summarizes_a_small_pdb_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        fs::write(
            &input,
            "ATOM      1  CA  GLY A   1       0.000   0.000   0.000  1.00  0.00           C  \nEND   \n",
        )
        .unwrap();

        run(InfoArgs {
            input,
            elements: None,
        })
        .unwrap();
    }
}
