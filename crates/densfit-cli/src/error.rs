use densfit::chem::ChemError;
use densfit::io::CoordError;
use densfit::models::structure::StructureError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    Elements(#[from] ChemError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
