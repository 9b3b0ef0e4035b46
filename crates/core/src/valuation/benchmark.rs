//! Benchmark test for ledger replay performance.

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::time::Instant;

    use stockval_shared::types::ProductId;

    use crate::stock::StockLedgerEntry;
    use crate::valuation::{ValuationEngine, ValuationMethod};

    /// Generate a long ledger: a receipt of 10 units followed by sales of 3 and 6.
    fn generate_ledger(cycles: usize) -> Vec<StockLedgerEntry> {
        let product = ProductId::new();
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut entries = Vec::with_capacity(cycles * 3);

        for i in 0..cycles {
            let base = start + Duration::minutes(i64::try_from(i * 3).unwrap());
            let cost = 1000 + i64::try_from(i % 100).unwrap();
            entries.push(StockLedgerEntry::receipt(product, Decimal::from(10), cost, base));
            entries.push(StockLedgerEntry::sale(
                product,
                Decimal::from(3),
                base + Duration::minutes(1),
            ));
            entries.push(StockLedgerEntry::sale(
                product,
                Decimal::from(6),
                base + Duration::minutes(2),
            ));
        }

        entries
    }

    #[test]
    fn benchmark_replay_60k_entries() {
        let cycles = 20_000;
        let entries = generate_ledger(cycles);
        let qty = Decimal::from(cycles);

        for method in ValuationMethod::ALL {
            let start = Instant::now();
            let result = ValuationEngine::compute(ProductId::new(), qty, method, &entries);
            let duration = start.elapsed();

            println!("\n=== BENCHMARK: {method}, {} entries ===", entries.len());
            println!("Duration: {duration:?}");
            println!("Value (cents): {}", result.value_cents);

            // Each cycle leaves one unit behind.
            if let Some(layers) = result.layers() {
                let total: Decimal = layers.iter().map(|l| l.quantity_remaining).sum();
                assert_eq!(total, qty);
            }

            // A quadratic replay would take far longer on this ledger.
            assert!(
                duration.as_secs() < 5,
                "Replay of {} entries took {duration:?}",
                entries.len()
            );
        }
    }

    #[test]
    fn benchmark_fifo_drains_a_long_backlog() {
        // Many small receipts, then one sale that empties all but the last.
        let product = ProductId::new();
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let receipts = 50_000;
        let mut entries: Vec<StockLedgerEntry> = (0..receipts)
            .map(|i| {
                let at = start + Duration::seconds(i64::try_from(i).unwrap());
                StockLedgerEntry::receipt(product, Decimal::ONE, 100, at)
            })
            .collect();
        entries.push(StockLedgerEntry::sale(
            product,
            Decimal::from(receipts - 1),
            start + Duration::days(1),
        ));

        let timer = Instant::now();
        let result = ValuationEngine::compute(product, Decimal::ONE, ValuationMethod::Fifo, &entries);
        let duration = timer.elapsed();

        println!("\n=== BENCHMARK: FIFO backlog drain, {} entries ===", entries.len());
        println!("Duration: {duration:?}");

        assert_eq!(result.fifo_layers.map(|l| l.len()), Some(1));
        assert_eq!(result.value_cents, 100);
    }
}
