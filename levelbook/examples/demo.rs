//! Walkthrough of the aggregated book lifecycle
//!
//! Run with: cargo run --example demo

use common::{Px, Qty};
use levelbook::{Order, OrderRegistry, Side};

fn order(id: u64, side: Side, price: f64, quantity: f64, symbol: &str) -> Order {
    Order {
        id,
        side,
        price: Px::new(price),
        quantity: Qty::new(quantity),
        symbol: symbol.to_owned(),
    }
}

fn print_book(registry: &OrderRegistry, symbol: &str) {
    let Some(book) = registry.book(symbol) else {
        println!("  (no book for {symbol})");
        return;
    };
    let snapshot = book.snapshot(10);
    println!("  {:^24} | {:^24}", "Bid", "Offer");
    println!("  {:>6} {:>9} {:>7} | {:<7} {:<9} {:<6}", "count", "qty", "price", "price", "qty", "count");
    let rows = snapshot.bids.len().max(snapshot.asks.len());
    for i in 0..rows {
        let bid = snapshot
            .bids
            .get(i)
            .map(|l| format!("{:>6} {:>9} {:>7}", l.count, l.quantity.as_f64(), l.price.as_f64()))
            .unwrap_or_else(|| " ".repeat(24));
        let ask = snapshot
            .asks
            .get(i)
            .map(|l| format!("{:<7} {:<9} {:<6}", l.price.as_f64(), l.quantity.as_f64(), l.count))
            .unwrap_or_default();
        println!("  {bid} | {ask}");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut registry = OrderRegistry::new();
    let symbol = "XYZ";

    println!("Building the bid side...");
    for (i, price) in [86.5, 86.4, 86.3, 86.2, 86.1].into_iter().enumerate() {
        registry.add_order(order(111 + i as u64, Side::Bid, price, 10_000.0, symbol))?;
    }

    println!("Building the offer side...");
    for (i, price) in [86.6, 86.7, 86.8, 86.9, 87.0].into_iter().enumerate() {
        registry.add_order(order(211 + i as u64, Side::Ask, price, 10_000.0, symbol))?;
    }
    print_book(&registry, symbol);

    println!("\nSecond order joins 86.7, a fresh level lands at 86.72...");
    registry.add_order(order(301, Side::Ask, 86.7, 10_000.0, symbol))?;
    registry.add_order(order(302, Side::Ask, 86.72, 10_000.0, symbol))?;
    print_book(&registry, symbol);

    println!("\nBoth 86.7 orders leave, the level goes with the last one...");
    registry.remove_order(301)?;
    registry.remove_order(212)?;
    print_book(&registry, symbol);

    println!("\nResizing the 86.6 order down to 8000...");
    registry.replace_order(211, Qty::new(8_000.0))?;
    print_book(&registry, symbol);

    let price = registry.price_at_level(Side::Bid, 2, symbol)?;
    println!("\nThird-best bid: {price}");
    if let Err(err) = registry.price_at_level(Side::Bid, 6, symbol) {
        println!("Probing past the depth: {err}");
    }
    println!(
        "{} orders across {} book(s)",
        registry.order_count(),
        registry.book_count()
    );
    Ok(())
}
