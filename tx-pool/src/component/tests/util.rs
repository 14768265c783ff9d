use tessara_types::{Byte32, Transaction};

pub(crate) fn key(tag: u8) -> Byte32 {
    let mut raw = [0u8; 32];
    raw[0] = tag;
    Byte32::new(raw)
}

/// A transaction distinguishable by `id`, from `sender`, with the fee
/// profile `gas_limit * gas_price`.
pub(crate) fn build_tx(
    id: u16,
    sender: u8,
    nonce: u64,
    gas_limit: u64,
    gas_price: u64,
) -> Transaction {
    let mut raw = [0u8; 32];
    raw[0..2].copy_from_slice(&id.to_be_bytes());
    Transaction::builder()
        .hash(Byte32::new(raw))
        .sender(key(sender))
        .recipient(key(0xee))
        .amount(1_000)
        .nonce(nonce)
        .gas_limit(gas_limit)
        .gas_price(gas_price)
        .build()
}
