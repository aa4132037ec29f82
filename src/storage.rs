pub mod contract;
pub mod local;

pub use contract::{ByteStore, FileStat};
pub use local::LocalByteStore;
