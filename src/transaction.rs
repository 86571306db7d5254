use crate::Sha256;
use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction data.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionId(Sha256);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0.as_slice()
    }
}

/// The index of the transaction output.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct OutputIndex(i32);

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OutputIndex {
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    // 32 bytes. A pointer to the transaction containing the UTXO to be spent.
    utxo_id: TransactionId,
    // 4 bytes. The number of UTXO to be spent, the first one is 0.
    output_index: OutputIndex,
    // Signature over the transaction's signable payload for this input's
    // position. Produced by the owner of the referenced output.
    signature: Vec<u8>,
}

impl TransactionInput {
    pub fn new(utxo_id: TransactionId, output_index: OutputIndex, signature: Vec<u8>) -> Self {
        Self {
            utxo_id,
            output_index,
            signature,
        }
    }

    pub fn utxo_id(&self) -> &TransactionId {
        &self.utxo_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionOutput {
    amount: i64,
    // The public key of the recipient, used to verify the signature that
    // eventually spends this output.
    to: PublicKey,
}

impl TransactionOutput {
    pub fn new(amount: i64, to: PublicKey) -> Self {
        Self { amount, to }
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn to(&self) -> &PublicKey {
        &self.to
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl Transaction {
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        let id = Self::hash_transaction_data(&inputs, &outputs);
        Self {
            id,
            inputs,
            outputs,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    /// Returns the canonical bytes that the input at `input_index` must be
    /// signed over: the input's spent-output reference followed by all
    /// transaction outputs. Signatures are not part of the payload, so the
    /// payload is the same before and after the transaction is signed.
    ///
    /// Precondition: `input_index` is a valid index into the inputs.
    pub fn signable_payload(&self, input_index: usize) -> Vec<u8> {
        let input = &self.inputs[input_index];
        Self::payload_to_sign(&input.utxo_id, &input.output_index, &self.outputs)
    }

    /// The same signable bytes as `signable_payload`, computable before the
    /// signed transaction object exists. Wallets use this to produce the
    /// signature that goes into `TransactionInput::new`.
    pub fn payload_to_sign(
        utxo_id: &TransactionId,
        output_index: &OutputIndex,
        outputs: &[TransactionOutput],
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(utxo_id.as_slice());
        data.extend_from_slice(&output_index.value().to_be_bytes());
        for output in outputs {
            Self::append_output_data(&mut data, output);
        }
        data
    }

    fn hash_transaction_data(
        inputs: &[TransactionInput],
        outputs: &[TransactionOutput],
    ) -> TransactionId {
        let mut data = Vec::new();
        for input in inputs {
            data.extend_from_slice(input.utxo_id.as_slice());
            data.extend_from_slice(&input.output_index.value().to_be_bytes());
            data.extend_from_slice(&input.signature);
        }
        for output in outputs {
            Self::append_output_data(&mut data, output);
        }
        let first_hash = Sha256::digest(&data);
        let second_hash = Sha256::digest(first_hash.as_slice());
        TransactionId(second_hash)
    }

    fn append_output_data(data: &mut Vec<u8>, output: &TransactionOutput) {
        data.extend_from_slice(&output.amount.to_be_bytes());
        data.extend_from_slice(&output.to.serialize());
    }
}
