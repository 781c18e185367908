use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::core::Result;
use crate::symbolic::expr::Expr;
use crate::symbolic::function::Applied;
use crate::symbolic::symbol::Symbol;

/// Indivisible factor of a monomial
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Atom {
    Sym(Symbol),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Exp(Box<Expr>),
    Func(Applied),
}

impl Atom {
    pub fn depends_on(&self, x: &Symbol) -> bool {
        match self {
            Atom::Sym(s) => s == x,
            Atom::Sin(arg) | Atom::Cos(arg) | Atom::Exp(arg) => arg.depends_on(x),
            Atom::Func(applied) => applied.depends_on(x),
        }
    }

    /// Chain rule for function atoms; symbols differentiate to 0 or 1
    pub fn diff(&self, x: &Symbol) -> Expr {
        match self {
            Atom::Sym(s) if s == x => Expr::one(),
            Atom::Sym(_) => Expr::zero(),
            Atom::Sin(arg) => {
                let inner = arg.diff(x);
                if inner.is_zero() {
                    return Expr::zero();
                }
                arg.cos() * inner
            }
            Atom::Cos(arg) => {
                let inner = arg.diff(x);
                if inner.is_zero() {
                    return Expr::zero();
                }
                -(arg.sin() * inner)
            }
            Atom::Exp(arg) => {
                let inner = arg.diff(x);
                if inner.is_zero() {
                    return Expr::zero();
                }
                arg.exp() * inner
            }
            Atom::Func(applied) => applied.diff(x),
        }
    }

    pub fn subs(&self, x: &Symbol, value: &Expr) -> Result<Expr> {
        Ok(match self {
            Atom::Sym(s) if s == x => value.clone(),
            Atom::Sym(s) => Expr::symbol(s),
            Atom::Sin(arg) => arg.subs(x, value)?.sin(),
            Atom::Cos(arg) => arg.subs(x, value)?.cos(),
            Atom::Exp(arg) => arg.subs(x, value)?.exp(),
            Atom::Func(applied) => applied.subs(x, value)?,
        })
    }
}

/// Product of atoms with positive exponents, sorted by atom.
///
/// Ordered graded-lexicographically, which is a monomial order: the
/// leading term of a product is the product of the leading terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Monomial(Vec<(Atom, u32)>);

impl Monomial {
    pub fn one() -> Self {
        Monomial(Vec::new())
    }

    pub fn from_atom(atom: Atom, exp: u32) -> Self {
        if exp == 0 {
            Monomial::one()
        } else {
            Monomial(vec![(atom, exp)])
        }
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub fn factors(&self) -> &[(Atom, u32)] {
        &self.0
    }

    pub fn degree(&self) -> u32 {
        self.0.iter().map(|(_, e)| *e).sum()
    }

    pub fn exponent(&self, atom: &Atom) -> u32 {
        self.0
            .binary_search_by(|(a, _)| a.cmp(atom))
            .map(|idx| self.0[idx].1)
            .unwrap_or(0)
    }

    /// Quotient if every exponent of `divisor` fits in `self`
    pub fn checked_div(&self, divisor: &Monomial) -> Option<Monomial> {
        let mut out = Vec::with_capacity(self.0.len());
        let mut j = 0;
        for (atom, e) in &self.0 {
            let mut e = *e;
            if j < divisor.0.len() && divisor.0[j].0 == *atom {
                e = e.checked_sub(divisor.0[j].1)?;
                j += 1;
            } else if j < divisor.0.len() && divisor.0[j].0 < *atom {
                return None;
            }
            if e > 0 {
                out.push((atom.clone(), e));
            }
        }
        if j < divisor.0.len() {
            return None;
        }
        Some(Monomial(out))
    }

    pub fn gcd(&self, other: &Monomial) -> Monomial {
        Monomial(
            self.0
                .iter()
                .filter_map(|(atom, e)| {
                    let shared = (*e).min(other.exponent(atom));
                    (shared > 0).then(|| (atom.clone(), shared))
                })
                .collect(),
        )
    }

    /// Same monomial with the exponent at `idx` lowered by one
    fn lowered(&self, idx: usize) -> Monomial {
        let mut factors = self.0.clone();
        if factors[idx].1 == 1 {
            factors.remove(idx);
        } else {
            factors[idx].1 -= 1;
        }
        Monomial(factors)
    }

    /// Removes the given symbols if they occur with exactly the given exponents
    pub fn strip_symbols(&self, pattern: &[(Symbol, u32)]) -> Option<Monomial> {
        let matches = pattern
            .iter()
            .all(|(s, e)| self.exponent(&Atom::Sym(s.clone())) == *e);
        if !matches {
            return None;
        }
        Some(Monomial(
            self.0
                .iter()
                .filter(|(atom, _)| match atom {
                    Atom::Sym(s) => !pattern.iter().any(|(p, _)| p == s),
                    _ => true,
                })
                .cloned()
                .collect(),
        ))
    }
}

impl<'a, 'b> Mul<&'b Monomial> for &'a Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &'b Monomial) -> Monomial {
        let (a, b) = (&self.0, &rhs.0);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => {
                    out.push(a[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(b[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    out.push((a[i].0.clone(), a[i].1 + b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Monomial(out)
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree().cmp(&other.degree()).then_with(|| {
            let (a, b) = (&self.0, &other.0);
            let (mut i, mut j) = (0, 0);
            loop {
                match (a.get(i), b.get(j)) {
                    (None, None) => return Ordering::Equal,
                    (Some(_), None) => return Ordering::Greater,
                    (None, Some(_)) => return Ordering::Less,
                    (Some((x, ex)), Some((y, ey))) => match x.cmp(y) {
                        Ordering::Less => return Ordering::Greater,
                        Ordering::Greater => return Ordering::Less,
                        Ordering::Equal => match ex.cmp(ey) {
                            Ordering::Equal => {
                                i += 1;
                                j += 1;
                            }
                            unequal => return unequal,
                        },
                    },
                }
            }
        })
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sparse multivariate polynomial over atoms with exact rational coefficients
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly::default()
    }

    pub fn one() -> Self {
        Poly::constant(BigRational::one())
    }

    pub fn constant(c: BigRational) -> Self {
        Poly::from_term(Monomial::one(), c)
    }

    pub fn from_atom(atom: Atom) -> Self {
        Poly::from_term(Monomial::from_atom(atom, 1), BigRational::one())
    }

    pub fn from_term(m: Monomial, c: BigRational) -> Self {
        let mut p = Poly::zero();
        p.add_term(m, c);
        p
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.as_constant().map_or(false, |c| c.is_one())
    }

    pub fn as_constant(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(m, _)| m.is_one())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    /// The atom itself when the polynomial is exactly `atom^1`
    pub fn as_atom(&self) -> Option<&Atom> {
        if self.terms.len() != 1 {
            return None;
        }
        let (m, c) = self.terms.iter().next()?;
        match m.factors() {
            [(atom, 1)] if c.is_one() => Some(atom),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    pub fn leading(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.iter().next_back()
    }

    pub fn degree(&self) -> u32 {
        self.leading().map_or(0, |(m, _)| m.degree())
    }

    pub(crate) fn add_term(&mut self, m: Monomial, c: BigRational) {
        if c.is_zero() {
            return;
        }
        match self.terms.entry(m) {
            Entry::Vacant(slot) => {
                slot.insert(c);
            }
            Entry::Occupied(mut slot) => {
                let sum = slot.get() + &c;
                if sum.is_zero() {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
        }
    }

    pub fn scale(&self, c: &BigRational) -> Poly {
        if c.is_zero() {
            return Poly::zero();
        }
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(m, k)| (m.clone(), k * c))
                .collect(),
        }
    }

    pub fn mul_term(&self, m: &Monomial, c: &BigRational) -> Poly {
        if c.is_zero() {
            return Poly::zero();
        }
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(k, v)| (k * m, v * c))
                .collect(),
        }
    }

    pub fn pow(&self, n: u32) -> Poly {
        let mut acc = Poly::one();
        for _ in 0..n {
            acc = &acc * self;
        }
        acc
    }

    /// Splits off the leading coefficient: `self = lc * monic`
    pub fn monic(&self) -> (BigRational, Poly) {
        match self.leading() {
            Some((_, lc)) => {
                let lc = lc.clone();
                let monic = self.scale(&lc.recip());
                (lc, monic)
            }
            None => (BigRational::zero(), Poly::zero()),
        }
    }

    /// Greatest common monomial dividing every term
    pub fn monomial_content(&self) -> Monomial {
        let mut iter = self.terms.keys();
        let Some(first) = iter.next() else {
            return Monomial::one();
        };
        iter.fold(first.clone(), |acc, m| acc.gcd(m))
    }

    pub fn div_monomial(&self, m: &Monomial) -> Option<Poly> {
        let mut out = Poly::zero();
        for (k, c) in &self.terms {
            out.add_term(k.checked_div(m)?, c.clone());
        }
        Some(out)
    }

    /// Exact division: `Some(q)` with `q * divisor == self`, or `None` if
    /// `divisor` does not divide `self` in the polynomial ring.
    pub fn div_exact(&self, divisor: &Poly) -> Option<Poly> {
        let (lead_m, lead_c) = divisor.leading()?;
        if self.is_zero() {
            return Some(Poly::zero());
        }
        if divisor.degree() > self.degree() {
            return None;
        }
        let mut rem = self.clone();
        let mut quot = Poly::zero();
        while let Some((m, c)) = rem.leading() {
            let t = m.checked_div(lead_m)?;
            let coef = c / lead_c;
            rem = &rem - &divisor.mul_term(&t, &coef);
            quot.add_term(t, coef);
        }
        Some(quot)
    }

    pub fn depends_on(&self, x: &Symbol) -> bool {
        self.terms
            .keys()
            .any(|m| m.factors().iter().any(|(atom, _)| atom.depends_on(x)))
    }

    /// Pythagorean normal form: every `cos(u)^k` with `k >= 2` is rewritten
    /// through `cos(u)^2 = 1 - sin(u)^2`, leaving cosines of degree at most one.
    pub fn trig_reduce(&self) -> Poly {
        let mut out = Poly::zero();
        for (m, c) in &self.terms {
            let mut term = Poly::constant(c.clone());
            let mut rest = Vec::with_capacity(m.factors().len());
            for (atom, e) in m.factors() {
                match atom {
                    Atom::Cos(arg) if *e >= 2 => {
                        if e % 2 == 1 {
                            rest.push((atom.clone(), 1));
                        }
                        let sin = Poly::from_atom(Atom::Sin(arg.clone()));
                        let pythagorean = &Poly::one() - &(&sin * &sin);
                        term = &term * &pythagorean.pow(e / 2);
                    }
                    _ => rest.push((atom.clone(), *e)),
                }
            }
            out = &out + &term.mul_term(&Monomial(rest), &BigRational::one());
        }
        out
    }

    pub fn diff(&self, x: &Symbol) -> Expr {
        let mut poly_part = Poly::zero();
        let mut func_part = Expr::zero();
        for (m, c) in &self.terms {
            for (idx, (atom, e)) in m.factors().iter().enumerate() {
                if !atom.depends_on(x) {
                    continue;
                }
                let scale = c * BigRational::from_integer(BigInt::from(*e));
                let lowered = m.lowered(idx);
                match atom {
                    Atom::Sym(_) => poly_part.add_term(lowered, scale),
                    _ => {
                        let outer = Expr::from_poly(Poly::from_term(lowered, scale));
                        func_part += outer * atom.diff(x);
                    }
                }
            }
        }
        Expr::from_poly(poly_part) + func_part
    }

    pub fn subs(&self, x: &Symbol, value: &Expr) -> Result<Expr> {
        if !self.depends_on(x) {
            return Ok(Expr::from_poly(self.clone()));
        }
        let mut out = Expr::zero();
        for (m, c) in &self.terms {
            let mut term = Expr::from_rational(c.clone());
            for (atom, e) in m.factors() {
                term = term * atom.subs(x, value)?.pow(*e);
            }
            out += term;
        }
        Ok(out)
    }
}

impl<'a, 'b> Add<&'b Poly> for &'a Poly {
    type Output = Poly;

    fn add(self, rhs: &'b Poly) -> Poly {
        let (mut acc, other) = if self.len() >= rhs.len() {
            (self.clone(), rhs)
        } else {
            (rhs.clone(), self)
        };
        for (m, c) in &other.terms {
            acc.add_term(m.clone(), c.clone());
        }
        acc
    }
}

impl<'a, 'b> Sub<&'b Poly> for &'a Poly {
    type Output = Poly;

    fn sub(self, rhs: &'b Poly) -> Poly {
        let mut acc = self.clone();
        for (m, c) in &rhs.terms {
            acc.add_term(m.clone(), -c);
        }
        acc
    }
}

impl<'a, 'b> Mul<&'b Poly> for &'a Poly {
    type Output = Poly;

    fn mul(self, rhs: &'b Poly) -> Poly {
        let mut acc = Poly::zero();
        for (m, c) in &self.terms {
            for (k, v) in &rhs.terms {
                acc.add_term(m * k, c * v);
            }
        }
        acc
    }
}

impl<'a> Neg for &'a Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        self.scale(&-BigRational::one())
    }
}
