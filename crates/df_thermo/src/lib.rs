/// Base, TermBase, NucleotideVec, ....
mod nucleotides;

/// Nearest neighbor windows and their table indexing.
mod neighbour;

/// The built-in thermodynamic parameter tables.
mod tables;

/// The reaction condition threaded through every evaluation.
mod condition;

/// The SantaLucia free energy evaluator.
mod model;

pub use nucleotides::*;
pub use neighbour::*;
pub use tables::*;
pub use condition::*;
pub use model::*;
