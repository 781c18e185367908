use std::fmt;
use std::sync::Arc;

/// A symbolic variable: a coordinate, a parameter, or the differential of another symbol.
///
/// Differentials are keyed by the identity of their base symbol rather than by a
/// synthesized name, so `Symbol::new("x").differential()` is never equal to
/// `Symbol::new("dx")` even though both print as `dx`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// Plain named symbol
    Named(Arc<str>),
    /// Differential `d<base>` of a base symbol
    Differential(Arc<Symbol>),
}

impl Symbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        Symbol::Named(Arc::from(name.as_ref()))
    }

    /// The differential `d<self>` used by line elements
    pub fn differential(&self) -> Symbol {
        Symbol::Differential(Arc::new(self.clone()))
    }

    /// Base symbol if this is a differential
    pub fn base(&self) -> Option<&Symbol> {
        match self {
            Symbol::Named(_) => None,
            Symbol::Differential(base) => Some(base),
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Named(name) => write!(f, "{}", name),
            Symbol::Differential(base) => write!(f, "d{}", base),
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

/// Build several symbols from a whitespace or comma separated list: `symbols("t r θ φ")`
pub fn symbols(names: &str) -> Vec<Symbol> {
    names
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|name| !name.is_empty())
        .map(Symbol::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differential_display() {
        let t = Symbol::new("t");
        assert_eq!(t.differential().to_string(), "dt");
        assert_eq!(t.differential().base(), Some(&t));
    }

    #[test]
    fn test_differential_never_collides_with_named() {
        let x = Symbol::new("x");
        let dx_named = Symbol::new("dx");

        assert_eq!(x.differential().to_string(), dx_named.to_string());
        assert_ne!(x.differential(), dx_named);
        assert_ne!(dx_named.differential(), x.differential().differential());
    }

    #[test]
    fn test_symbols_list() {
        let coords = symbols("t, r θ  φ");
        assert_eq!(coords.len(), 4);
        assert_eq!(coords[2], Symbol::new("θ"));
    }
}
