pub mod testing_mocks;
pub mod utils;
