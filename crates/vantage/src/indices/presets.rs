//! Built-in index definitions.

use vantage_metrics::{IndexDefinition, WeightedConstituent};

/// Benchmark of the built-in indices: the Ibovespa.
pub const IBOVESPA: &str = "^BVSP";

/// Index X: Banco do Brasil, Petrobras and EZTEC.
pub fn index_x() -> IndexDefinition {
    IndexDefinition::new(
        "Index X",
        IBOVESPA,
        vec![
            WeightedConstituent::new("BBAS3.SA", 0.3),
            WeightedConstituent::new("PETR4.SA", 0.5),
            WeightedConstituent::new("EZTC3.SA", 0.2),
        ],
    )
    .with_description("Test index of three B3 stocks: BBAS3, PETR4 and EZTC3.")
}

/// Index Y: Itaú, Petrobras and Bradesco.
pub fn index_y() -> IndexDefinition {
    IndexDefinition::new(
        "Index Y",
        IBOVESPA,
        vec![
            WeightedConstituent::new("ITUB4.SA", 0.4),
            WeightedConstituent::new("PETR4.SA", 0.2),
            WeightedConstituent::new("BBDC3.SA", 0.4),
        ],
    )
    .with_description("Test index of three B3 stocks: ITUB4, PETR4 and BBDC3.")
}

/// Every built-in definition.
pub fn builtin() -> Vec<IndexDefinition> {
    vec![index_x(), index_y()]
}
