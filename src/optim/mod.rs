pub mod anneal;

pub use anneal::Annealing;
