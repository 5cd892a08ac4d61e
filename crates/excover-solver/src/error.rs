use excover_core::{BuildError, LinkError, MatrixError};

/// Errors that can occur while solving an exact cover instance.
///
/// Finding no solution is not an error; solve functions return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolverError {
    /// The input is not a rectangular matrix of the declared size.
    #[display("invalid input matrix: {_0}")]
    Matrix(#[from] MatrixError),
    /// The link structure could not be built.
    #[display("failed to build dancing links: {_0}")]
    Build(#[from] BuildError),
    /// The link structure was left inconsistent.
    #[display("inconsistent dancing links: {_0}")]
    Link(#[from] LinkError),
}
