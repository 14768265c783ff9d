use bytes::Bytes;

use crate::Byte32;

/// Category tag carried on the wire with every transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TxType {
    /// Plain value transfer.
    #[default]
    Transfer,
    /// Carries an opaque contract payload.
    Contract,
    /// Block reward; never enters the staging pool from the network.
    Coinbase,
}

/// A validated-but-unconfirmed transaction, exactly as handed over by the
/// verifier. Immutable once built; the pool keeps its own bookkeeping
/// (priority, insertion time) outside this record.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    hash: Byte32,
    sender: Byte32,
    recipient: Byte32,
    amount: u64,
    nonce: u64,
    gas_limit: u64,
    gas_price: u64,
    signature: Bytes,
    payload: Bytes,
    timestamp: u64,
    tx_type: TxType,
}

impl Transaction {
    /// Start building a transaction.
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    /// Content hash; uniquely identifies the transaction.
    pub fn hash(&self) -> Byte32 {
        self.hash
    }

    /// Sender identity.
    pub fn sender(&self) -> Byte32 {
        self.sender
    }

    /// Recipient identity.
    pub fn recipient(&self) -> Byte32 {
        self.recipient
    }

    /// Transferred amount.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Per-sender sequence number.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Gas the sender allows this transaction to burn.
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Price the sender bids per unit of gas.
    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    /// Total fee: `gas_limit * gas_price`.
    pub fn fee(&self) -> u64 {
        self.gas_limit.saturating_mul(self.gas_price)
    }

    /// Opaque signature blob; verified upstream.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    /// Opaque payload blob.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Submission timestamp, millis since the unix epoch, as claimed by the
    /// submitter.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Category tag.
    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }
}

/// Builder for [`Transaction`]; used at the verifier boundary and in tests.
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    hash: Byte32,
    sender: Byte32,
    recipient: Byte32,
    amount: u64,
    nonce: u64,
    gas_limit: u64,
    gas_price: u64,
    signature: Bytes,
    payload: Bytes,
    timestamp: u64,
    tx_type: TxType,
}

impl TransactionBuilder {
    /// Set the content hash.
    pub fn hash(mut self, hash: Byte32) -> Self {
        self.hash = hash;
        self
    }

    /// Set the sender identity.
    pub fn sender(mut self, sender: Byte32) -> Self {
        self.sender = sender;
        self
    }

    /// Set the recipient identity.
    pub fn recipient(mut self, recipient: Byte32) -> Self {
        self.recipient = recipient;
        self
    }

    /// Set the transferred amount.
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Set the per-sender sequence number.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Set the gas limit.
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Set the gas price.
    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Set the signature blob.
    pub fn signature(mut self, signature: Bytes) -> Self {
        self.signature = signature;
        self
    }

    /// Set the payload blob.
    pub fn payload(mut self, payload: Bytes) -> Self {
        self.payload = payload;
        self
    }

    /// Set the submission timestamp.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the category tag.
    pub fn tx_type(mut self, tx_type: TxType) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// Finish the record.
    pub fn build(self) -> Transaction {
        let TransactionBuilder {
            hash,
            sender,
            recipient,
            amount,
            nonce,
            gas_limit,
            gas_price,
            signature,
            payload,
            timestamp,
            tx_type,
        } = self;
        Transaction {
            hash,
            sender,
            recipient,
            amount,
            nonce,
            gas_limit,
            gas_price,
            signature,
            payload,
            timestamp,
            tx_type,
        }
    }
}
