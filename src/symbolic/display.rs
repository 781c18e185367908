use std::fmt;

use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::symbolic::expr::Expr;
use crate::symbolic::poly::{Atom, Monomial, Poly};

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Sym(s) => write!(f, "{}", s),
            Atom::Sin(arg) => write!(f, "sin({})", arg),
            Atom::Cos(arg) => write!(f, "cos({})", arg),
            Atom::Exp(arg) => write!(f, "exp({})", arg),
            Atom::Func(applied) => write!(f, "{}", applied),
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (idx, (atom, e)) in self.factors().iter().enumerate() {
            if idx > 0 {
                write!(f, "*")?;
            }
            if *e == 1 {
                write!(f, "{}", atom)?;
            } else {
                write!(f, "{}^{}", atom, e)?;
            }
        }
        Ok(())
    }
}

/// `magnitude * m` for a positive coefficient
fn write_term(f: &mut fmt::Formatter<'_>, magnitude: &BigRational, m: &Monomial) -> fmt::Result {
    if m.is_one() {
        return write!(f, "{}", magnitude);
    }
    if !magnitude.is_one() {
        if magnitude.is_integer() {
            write!(f, "{}*", magnitude)?;
        } else {
            write!(f, "({})*", magnitude)?;
        }
    }
    write!(f, "{}", m)
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (idx, (m, c)) in self.terms().rev().enumerate() {
            let negative = c.is_negative();
            match (idx, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            write_term(f, &c.abs(), m)?;
        }
        Ok(())
    }
}

/// Numerator text with rational and monomial content factored out.
/// The flag reports a bare sum that needs parentheses before a `/`.
fn numerator_text(coeff: &BigRational, num: &Poly) -> (String, bool) {
    let sign = if coeff.is_negative() { "-" } else { "" };
    let magnitude = coeff.abs();

    if let Some(c) = num.as_constant() {
        return (format!("{}", coeff * c), false);
    }
    if num.len() == 1 {
        if let Some((m, c)) = num.leading() {
            let value = &magnitude * c;
            let mut text = String::from(sign);
            if !value.is_one() {
                if value.is_integer() {
                    text.push_str(&format!("{}*", value));
                } else {
                    text.push_str(&format!("({})*", value));
                }
            }
            text.push_str(&m.to_string());
            return (text, false);
        }
    }

    let content = num.monomial_content();
    let (content, body) = match num.div_monomial(&content) {
        Some(rest) => (content, rest.to_string()),
        None => (Monomial::one(), num.to_string()),
    };

    if magnitude.is_one() && content.is_one() {
        if sign.is_empty() {
            return (body, true);
        }
        return (format!("-({})", body), false);
    }

    let mut pieces = Vec::new();
    if !magnitude.is_one() {
        pieces.push(magnitude.to_string());
    }
    if !content.is_one() {
        pieces.push(content.to_string());
    }
    pieces.push(format!("({})", body));
    (format!("{}{}", sign, pieces.join("*")), false)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let scale = self.scale();
        let numer = BigRational::from_integer(scale.numer().clone());
        let (numerator, is_sum) = numerator_text(&numer, self.numerator());

        let mut parts = Vec::new();
        if !scale.denom().is_one() {
            parts.push(scale.denom().to_string());
        }
        for (factor, k) in self.denominator() {
            let base = if factor.len() > 1 {
                format!("({})", factor)
            } else {
                factor.to_string()
            };
            if *k > 1 {
                parts.push(format!("{}^{}", base, k));
            } else {
                parts.push(base);
            }
        }

        match parts.len() {
            0 => write!(f, "{}", numerator),
            _ => {
                let numerator = if is_sum {
                    format!("({})", numerator)
                } else {
                    numerator
                };
                if parts.len() == 1 {
                    write!(f, "{}/{}", numerator, parts[0])
                } else {
                    write!(f, "{}/({})", numerator, parts.join("*"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{Expr, Symbol};

    #[test]
    fn test_display_constant_over_power() {
        let r0 = Expr::symbol(&Symbol::new("r0"));
        let curvature = Expr::int(2).checked_div(&r0.pow(2)).unwrap();
        assert_eq!(curvature.to_string(), "2/r0^2");
    }

    #[test]
    fn test_display_polynomial() {
        let x = Expr::symbol(&Symbol::new("x"));
        let p = (&x - &Expr::one()).pow(2);
        assert_eq!(p.to_string(), "x^2 - 2*x + 1");
    }

    #[test]
    fn test_display_trig_monomial() {
        let theta = Expr::symbol(&Symbol::new("θ"));
        let e = -(theta.sin() * theta.cos());
        assert_eq!(e.to_string(), "-sin(θ)*cos(θ)");
    }

    #[test]
    fn test_display_rational_coefficient() {
        let x = Expr::symbol(&Symbol::new("x"));
        assert_eq!((Expr::rational(1, 2) * &x).to_string(), "x/2");
        assert_eq!(Expr::rational(-3, 4).to_string(), "-3/4");
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(Expr::zero().to_string(), "0");
    }
}
