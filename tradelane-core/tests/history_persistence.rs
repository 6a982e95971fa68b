//! History ledger and save/restore

use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tradelane_core::config::HistoryConfig;
use tradelane_core::{
    CommodityCatalog, Economy, EconomyConfig, EconomyError, HistoryLedger, LocationDescriptor,
    LocationKind, PriceSample, ResourceRating,
};

fn frontier() -> Economy {
    let mut economy = Economy::new(
        Arc::new(CommodityCatalog::standard()),
        EconomyConfig::quiet().with_seed(8),
    );
    for (name, kind) in [
        ("Outpost", LocationKind::Frontier),
        ("Foundry", LocationKind::Industrial),
        ("Granary", LocationKind::Agricultural),
    ] {
        economy.create_market(&LocationDescriptor::new(
            name,
            kind,
            800_000,
            ResourceRating::Rich,
        ));
    }
    economy
}

#[test]
fn test_plain_ledger_records() {
    let mut ledger = HistoryLedger::from_plain(BTreeMap::new());

    ledger.record("Outpost", "Fuel", 1, 38.5);

    assert_eq!(
        ledger.series("Outpost", "Fuel"),
        &[PriceSample {
            tick: 1,
            price: 38.5
        }]
    );
}

#[test]
fn test_ticks_append_history() {
    let mut economy = frontier();
    for _ in 0..10 {
        economy.tick_global_state(3);
    }

    let series = economy.history().series("Granary", "Ethergrain");
    assert_eq!(series.len(), 10);
    let ticks: Vec<u64> = series.iter().map(|s| s.tick).collect();
    assert_eq!(ticks, (1..=10).collect::<Vec<_>>());
    assert_eq!(
        series.last().unwrap().price,
        economy.market("Granary").unwrap().price("Ethergrain").unwrap()
    );
}

#[test]
fn test_history_retention() {
    let mut config = EconomyConfig::quiet().with_seed(1);
    config.history = HistoryConfig {
        max_samples: Some(100),
    };
    let mut economy = Economy::new(Arc::new(CommodityCatalog::standard()), config);
    economy.create_market(&LocationDescriptor::new(
        "Outpost",
        LocationKind::Frontier,
        800_000,
        ResourceRating::Poor,
    ));

    for _ in 0..150 {
        economy.tick();
    }

    let series = economy.history().series("Outpost", "Fuel");
    assert_eq!(series.len(), 100);
    assert_eq!(series[0].tick, 51);
    assert_eq!(series[99].tick, 150);
}

#[test]
fn test_save_and_resume() {
    let mut economy = frontier();
    for _ in 0..25 {
        economy.tick_global_state(3);
    }

    let saved = serde_json::to_string(&economy.to_value().unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    let mut resumed = Economy::restore(
        Arc::new(CommodityCatalog::standard()),
        EconomyConfig::default().with_seed(8),
        value,
    )
    .unwrap();

    assert_eq!(resumed.turn(), 25);
    assert_eq!(resumed.markets().len(), 3);
    assert_eq!(resumed.history().sample_count(), economy.history().sample_count());
    for record in economy.markets().iter() {
        let back = resumed.market(record.name()).unwrap();
        assert_eq!(back.location, record.location);
        for (id, state) in &record.goods {
            let other = back.get(id).unwrap();
            assert_eq!(other.supply, state.supply);
            assert_eq!(other.demand, state.demand);
            assert!((other.price - state.price).abs() < 1e-9);
        }
    }

    // the resumed ledger keeps growing
    resumed.tick_global_state(3);
    assert_eq!(resumed.turn(), 26);
    assert_eq!(resumed.history().series("Outpost", "Fuel").len(), 26);
}

#[test]
fn test_garbage_state() {
    let catalog = Arc::new(CommodityCatalog::standard());

    let err = Economy::restore(catalog.clone(), EconomyConfig::quiet(), json!("save.dat"))
        .err()
        .unwrap();
    assert!(matches!(err, EconomyError::MalformedState(_)));

    let economy = Economy::restore(
        catalog,
        EconomyConfig::quiet(),
        json!({ "turn": "seven", "markets": [1, 2], "history": 4, "recent_events": {} }),
    )
    .unwrap();
    assert_eq!(economy.turn(), 0);
    assert!(economy.markets().is_empty());
    assert!(economy.history().is_empty());
    assert_eq!(economy.recent_events().count(), 0);
}

#[test]
fn test_restored_market_trades_immediately() {
    let state = json!({
        "markets": {
            "Outpost": {
                "location": { "name": "Outpost", "type": "Frontier" },
                "goods": {
                    "Fuel": { "supply": -20, "demand": "15", "price": "free", "price_shock": 0 }
                }
            }
        }
    });
    let mut economy =
        Economy::restore(Arc::new(CommodityCatalog::standard()), EconomyConfig::quiet(), state)
            .unwrap();

    let fuel = economy.market("Outpost").unwrap().get("Fuel").unwrap().clone();
    assert_eq!(fuel.supply, 0);
    assert_eq!(fuel.demand, 15);
    assert_eq!(fuel.price_shock, economy.config().pricing.min_shock);
    assert!(fuel.price > 0.0);

    let outcome = economy.buy("Outpost", "Fuel", 1, 1_000.0).unwrap();
    assert!(!outcome.is_filled());
}
