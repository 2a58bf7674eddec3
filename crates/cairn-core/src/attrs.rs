bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attributes: u32 {
        const HOLD_FIRST = 0b0000_0001;
        const HOLD_REST  = 0b0000_0010;
        const HOLD_ALL   = 0b0000_0100;
        const FLAT       = 0b0000_1000;
        const ORDERLESS  = 0b0001_0000;
        const NHOLD_ALL  = 0b0010_0000;
    }
}

impl Default for Attributes {
    fn default() -> Self { Attributes::empty() }
}

const NAMES: [(&str, Attributes); 6] = [
    ("Flat", Attributes::FLAT),
    ("HoldAll", Attributes::HOLD_ALL),
    ("HoldFirst", Attributes::HOLD_FIRST),
    ("HoldRest", Attributes::HOLD_REST),
    ("NHoldAll", Attributes::NHOLD_ALL),
    ("Orderless", Attributes::ORDERLESS),
];

impl Attributes {
    /// Looks up a kernel attribute by its symbol name (`"HoldFirst"`, `"Orderless"`, ...).
    pub fn from_attr_name(name: &str) -> Option<Attributes> {
        NAMES.iter().find(|(n, _)| *n == name).map(|(_, a)| *a)
    }

    /// Attribute names in alphabetical order.
    pub fn names(self) -> Vec<&'static str> {
        NAMES.iter().filter(|(_, a)| self.contains(*a)).map(|(n, _)| *n).collect()
    }

    /// Whether argument `index` (1-based, the head is 0) is evaluated under these attributes.
    pub fn evaluates_arg(self, index: usize) -> bool {
        if self.contains(Attributes::HOLD_ALL) {
            return false;
        }
        match index {
            0 => false,
            1 => !self.contains(Attributes::HOLD_FIRST),
            _ => !self.contains(Attributes::HOLD_REST),
        }
    }
}
