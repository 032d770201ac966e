pub mod export;
pub mod layout;
pub mod model_file;
pub mod network;

pub use layout::Shape;
pub use model_file::ModelFile;
pub use network::Network;
