pub mod store;

pub use store::{SaveData, SaveStore};
