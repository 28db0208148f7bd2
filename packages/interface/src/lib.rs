pub mod asset;
pub mod burner;
pub mod pool;
