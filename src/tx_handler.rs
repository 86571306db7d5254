use crate::{crypto, OutputIndex, Transaction, Utxo, UtxoPool};
use std::collections::HashSet;

/// The transaction-acceptance core of the ledger.
///
/// A handler owns a private snapshot of the UTXO pool it was constructed
/// from. Proposed transactions are checked against that snapshot and, once a
/// batch is accepted through `handle_epoch`, the snapshot is updated to
/// reflect exactly the accepted transactions. Accepted epochs are never
/// rolled back.
pub struct TxHandler {
    utxo_pool: UtxoPool,
}

impl TxHandler {
    /// Creates a handler whose ledger state starts as a copy of `utxo_pool`.
    /// The caller's pool is not aliased and never observes the handler's
    /// mutations.
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self {
            utxo_pool: utxo_pool.clone(),
        }
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    /// Returns whether the transaction is valid against the current snapshot,
    /// assuming no other transaction claims the same UTXOs. A transaction is
    /// valid if:
    ///   (1) every output it claims is in the current UTXO pool,
    ///   (2) the signature on each of its inputs is valid,
    ///   (3) no UTXO is claimed more than once by its inputs,
    ///   (4) all of its output amounts are non-negative, and
    ///   (5) its input total is greater than or equal to its output total.
    /// A surplus of inputs over outputs is allowed and simply not returned to
    /// anyone. The check never mutates the pool.
    pub fn is_valid_tx(&self, transaction: &Transaction) -> bool {
        let mut claimed_utxos = HashSet::new();
        let mut input_total: i64 = 0;
        for (input_index, input) in transaction.inputs().iter().enumerate() {
            let utxo = Utxo::new(*input.utxo_id(), *input.output_index());
            let spent_output = match self.utxo_pool.get(&utxo) {
                Some(output) => output,
                None => return false,
            };
            if !crypto::verify_signature(
                spent_output.to(),
                &transaction.signable_payload(input_index),
                input.signature(),
            ) {
                return false;
            }
            if !claimed_utxos.insert(utxo) {
                return false;
            }
            // A total that doesn't fit in the amount type can never be
            // conserved, so overflow rejects the transaction.
            input_total = match input_total.checked_add(spent_output.amount()) {
                Some(total) => total,
                None => return false,
            };
        }

        let mut output_total: i64 = 0;
        for output in transaction.outputs() {
            if output.amount() < 0 {
                return false;
            }
            output_total = match output_total.checked_add(output.amount()) {
                Some(total) => total,
                None => return false,
            };
        }
        input_total >= output_total
    }

    /// Processes one epoch: an unordered batch of proposed transactions.
    /// Returns the transactions that were accepted, in the same relative
    /// order they were proposed in, and updates the UTXO pool to reflect
    /// exactly those acceptances.
    ///
    /// Transactions are accepted greedily in presentation order. An accepted
    /// transaction's effects apply immediately, so a later transaction that
    /// claims an already-consumed UTXO is rejected (the earliest transaction
    /// in the batch wins a double-spend) and a later transaction may spend an
    /// output created earlier in the same batch. Invalid transactions are
    /// skipped without an error. Because of the greedy resolution, the
    /// accepted subset depends on the presentation order.
    pub fn handle_epoch(&mut self, proposed_transactions: &[Transaction]) -> Vec<Transaction> {
        let mut accepted_transactions = Vec::new();
        for transaction in proposed_transactions {
            if !self.is_valid_tx(transaction) {
                continue;
            }
            for input in transaction.inputs() {
                let utxo = Utxo::new(*input.utxo_id(), *input.output_index());
                self.utxo_pool.remove(&utxo);
            }
            for (output_index, output) in transaction.outputs().iter().enumerate() {
                let utxo = Utxo::new(
                    *transaction.id(),
                    OutputIndex::new(output_index as i32),
                );
                self.utxo_pool.insert(utxo, output.clone());
            }
            accepted_transactions.push(transaction.clone());
        }
        accepted_transactions
    }
}
