use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use minicoin_lib::{
    crypto, OutputIndex, Sha256, Transaction, TransactionId, TransactionInput, TransactionOutput,
    TxHandler, Utxo, UtxoPool,
};
use secp256k1::rand::thread_rng;

const TRANSACTIONS_PER_EPOCH: usize = 100;

/// Builds a pool with one UTXO per transaction and a batch of single-input
/// transfers that spend them, all owned by one key.
fn create_epoch() -> (UtxoPool, Vec<Transaction>) {
    let (secret_key, public_key) = secp256k1::generate_keypair(&mut thread_rng());
    let mut pool = UtxoPool::new();
    let mut transactions = Vec::new();
    for i in 0..TRANSACTIONS_PER_EPOCH {
        let utxo = Utxo::new(
            TransactionId::new(Sha256::from_raw([i as u8; 32])),
            OutputIndex::new(i as i32),
        );
        pool.insert(utxo, TransactionOutput::new(50, public_key));

        let outputs = vec![TransactionOutput::new(50, public_key)];
        let payload =
            Transaction::payload_to_sign(utxo.transaction_id(), utxo.output_index(), &outputs);
        let input = TransactionInput::new(
            *utxo.transaction_id(),
            *utxo.output_index(),
            crypto::sign_message(&secret_key, &payload),
        );
        transactions.push(Transaction::new(vec![input], outputs));
    }
    (pool, transactions)
}

fn handle_epoch_benchmark(c: &mut Criterion) {
    let (pool, transactions) = create_epoch();

    let mut group = c.benchmark_group("Epoch handling");
    group.throughput(Throughput::Elements(TRANSACTIONS_PER_EPOCH as u64));

    // Each iteration starts from a fresh handler so every transaction in the
    // batch finds its UTXO unspent.
    group.bench_function("handle_epoch with 100 single-input transfers", |b| {
        b.iter(|| {
            let mut handler = TxHandler::new(&pool);
            let accepted = handler.handle_epoch(black_box(&transactions));
            black_box(accepted);
        })
    });
    group.finish();
}

criterion_group!(benches, handle_epoch_benchmark);

criterion_main!(benches);
