use exchange_rate_index::{
    aggregate, CachedProvider, ExchangeRate, ExchangeRateProvider, PriceIndexError, ProviderRole,
};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

const CURRENCIES: [&str; 6] = ["USD", "EUR", "GBP", "JPY", "CHF", "BRL"];

fn quotes() -> impl Strategy<Value = BTreeMap<&'static str, f64>> {
    prop::collection::btree_map(prop::sample::select(CURRENCIES.to_vec()), 1.0..100000.0f64, 1..6)
}

fn build_providers(books: &[BTreeMap<&'static str, f64>]) -> Vec<CachedProvider> {
    books
        .iter()
        .enumerate()
        .map(|(i, book)| {
            let name = format!("P{}", i);
            let timestamp = 1000 * (i as i64 + 1);
            let rates = book
                .iter()
                .map(|(currency, price)| ExchangeRate::new(*currency, *price, &name, timestamp))
                .collect();
            CachedProvider::with_rates(name, format!("p{}", i), ProviderRole::Standard, rates)
        })
        .collect()
}

// Configure proptest to explicitly use a specific regression file
proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::Direct(
            "tests/property_tests.proptest-regressions".into()
        ))),
        cases: 100, // Number of test cases to run
        .. ProptestConfig::default()
    })]

    #[test]
    fn test_merge_properties(books in prop::collection::vec(quotes(), 1..5)) {
        let providers = build_providers(&books);
        let prices = aggregate(providers.iter().map(|p| p as &dyn ExchangeRateProvider)).unwrap();

        // Property 1: every currency carries the price of the last provider quoting it
        for rate in prices.data() {
            let winner = books
                .iter()
                .enumerate()
                .rev()
                .find(|(_, book)| book.contains_key(rate.currency()))
                .map(|(i, _)| i)
                .unwrap();
            prop_assert_eq!(rate.provider(), format!("P{}", winner));
            prop_assert_eq!(rate.price(), books[winner][rate.currency()]);
        }

        // Property 2: currencies appear once, in order of first occurrence
        let mut expected_order = Vec::new();
        let mut seen = HashSet::new();
        for book in &books {
            for currency in book.keys() {
                if seen.insert(*currency) {
                    expected_order.push(*currency);
                }
            }
        }
        let order: Vec<&str> = prices.data().iter().map(|r| r.currency()).collect();
        prop_assert_eq!(order, expected_order);

        // Property 3: exactly one Ts and one Count entry per provider
        prop_assert_eq!(prices.metadata().len(), 2 * books.len());
        for (i, book) in books.iter().enumerate() {
            prop_assert_eq!(prices.metadata().get(&format!("p{}Ts", i)), Some(1000 * (i as i64 + 1)));
            prop_assert_eq!(prices.metadata().get(&format!("p{}Count", i)), Some(book.len() as i64));
        }
    }

    #[test]
    fn test_empty_provider_always_fails(
        books in prop::collection::vec(quotes(), 0..4),
        position in 0..4usize,
    ) {
        let position = position.min(books.len());
        let mut providers = build_providers(&books);
        providers.insert(
            position,
            CachedProvider::new("Empty", "empty", ProviderRole::Standard),
        );

        let result = aggregate(providers.iter().map(|p| p as &dyn ExchangeRateProvider));

        prop_assert!(matches!(result, Err(PriceIndexError::MissingProviderData(ref name)) if name == "Empty"));
    }
}
