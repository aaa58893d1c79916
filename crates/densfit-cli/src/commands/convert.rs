use crate::cli::ConvertArgs;
use crate::error::Result;
use densfit::models::structure::Structure;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    info!("Reading '{}'.", args.input.display());
    let structure = Structure::from_path(&args.input)?;
    info!("Read {} atoms.", structure.natoms());

    match args.to {
        Some(format) => structure.tofile_as(&args.output, format.into())?,
        None => structure.tofile(&args.output)?,
    }
    info!("Wrote '{}'.", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FormatArg;
    use std::fs;
    use tempfile::tempdir;

    const MINI_PDB: &str =
        "ATOM      1  N   MET A   1      27.340  24.430   2.614  1.00  9.67           N  \nEND   \n";

    #[test]
    fn converts_pdb_to_mmcif_by_extension() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.cif");
        fs::write(&input, MINI_PDB).unwrap();

        run(ConvertArgs {
            input,
            output: output.clone(),
            to: None,
        })
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("data_"));
        assert!(text.contains("_atom_site.Cartn_x"));
    }

    #[test]
    fn explicit_format_flag_wins_over_the_extension() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        fs::write(&input, MINI_PDB).unwrap();

        run(ConvertArgs {
            input,
            output: output.clone(),
            to: Some(FormatArg::Mmcif),
        })
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("data_"));
    }

    #[test]
    fn unrecognized_output_extension_fails_without_a_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.xyz");
        fs::write(&input, MINI_PDB).unwrap();

        let result = run(ConvertArgs {
            input,
            output: output.clone(),
            to: None,
        });
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
