use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Base value for makes missing from [`MAKES`].
pub const DEFAULT_BASE_VALUE: Decimal = dec!(20000);

pub struct MakeEntry {
    pub name: &'static str,
    pub base_value: Decimal,
    pub premium: bool,
}

const fn make(name: &'static str, base_value: Decimal, premium: bool) -> MakeEntry {
    MakeEntry {
        name,
        base_value,
        premium,
    }
}

/// New-car reference values in EUR.
pub const MAKES: &[MakeEntry] = &[
    make("Porsche", dec!(70000), true),
    make("Tesla", dec!(45000), true),
    make("Mercedes-Benz", dec!(40000), true),
    make("BMW", dec!(35000), true),
    make("Audi", dec!(35000), true),
    make("Volvo", dec!(32000), true),
    make("Volkswagen", dec!(25000), false),
    make("Toyota", dec!(25000), false),
    make("Mazda", dec!(22000), false),
    make("Honda", dec!(22000), false),
    make("Skoda", dec!(20000), false),
    make("Hyundai", dec!(20000), false),
    make("Kia", dec!(20000), false),
    make("Ford", dec!(20000), false),
    make("Seat", dec!(19000), false),
    make("Opel", dec!(18000), false),
    make("Renault", dec!(18000), false),
    make("Peugeot", dec!(18000), false),
    make("Citroën", dec!(17000), false),
    make("Fiat", dec!(15000), false),
];

/// Case-insensitive lookup, ignoring surrounding whitespace.
pub fn lookup_make(name: &str) -> Option<&'static MakeEntry> {
    let needle = name.trim().to_lowercase();
    MAKES
        .iter()
        .find(|entry| entry.name.to_lowercase() == needle)
}
