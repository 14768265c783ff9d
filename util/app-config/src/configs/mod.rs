mod admission;
mod tx_pool;

pub use admission::AdmissionConfig;
pub use tx_pool::TxPoolConfig;
