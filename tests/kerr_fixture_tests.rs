use einstein::algorithms::{inverse, line_element_from_metric, metric_from_line_element};
use einstein::core::SymbolicTensor;
use einstein::metrics::{kerr_metric, schwarzschild_metric};
use einstein::symbolic::{Expr, Symbol};
use ndarray::Array2;

struct Params {
    m: Symbol,
    a: Symbol,
    r: Symbol,
    t: Symbol,
}

impl Params {
    fn new() -> Self {
        Params {
            m: Symbol::new("M"),
            a: Symbol::new("a"),
            r: Symbol::new("r"),
            t: Symbol::new("T"),
        }
    }

    fn exprs(&self) -> (Expr, Expr, Expr, Expr) {
        (
            Expr::symbol(&self.m),
            Expr::symbol(&self.a),
            Expr::symbol(&self.r),
            Expr::symbol(&self.t),
        )
    }

    fn kerr(&self) -> Array2<Expr> {
        let (m, a, r, t) = self.exprs();
        kerr_metric(&m, &a, &r, &t).unwrap()
    }
}

#[test]
fn test_kerr_literal_entries() {
    let params = Params::new();
    let (m, a, r, t) = params.exprs();
    let g = params.kerr();

    let two = Expr::int(2);
    let sin2 = t.sin().pow(2);
    let sigma = a.pow(2) * t.cos().pow(2) + r.pow(2);
    let delta = a.pow(2) - &two * &m * &r + r.pow(2);

    let g_tt = Expr::int(-1) + (&two * &m * &r).checked_div(&sigma).unwrap();
    let g_tphi = (Expr::int(-2) * &a * &m * &r * &sin2)
        .checked_div(&(r.pow(2) + a.pow(2) * t.cos().pow(2)))
        .unwrap();
    let g_rr = sigma.checked_div(&delta).unwrap();
    let g_phph = (&sin2 * ((a.pow(2) + r.pow(2)).pow(2) - a.pow(2) * &delta * &sin2))
        .checked_div(&sigma)
        .unwrap();

    assert!(g[[0, 0]].equivalent(&g_tt));
    assert!(g[[0, 3]].equivalent(&g_tphi));
    assert!(g[[3, 0]].equivalent(&g_tphi));
    assert!(g[[1, 1]].equivalent(&g_rr));
    assert!(g[[2, 2]].equivalent(&sigma));
    assert!(g[[3, 3]].equivalent(&g_phph));

    for (i, j) in [(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)] {
        assert!(g[[i, j]].is_zero());
        assert!(g[[j, i]].is_zero());
    }
}

#[test]
fn test_kerr_reduces_to_schwarzschild() {
    let params = Params::new();
    let (m, _, r, t) = params.exprs();
    let kerr = params.kerr();

    let reduced = kerr.map(|e| e.subs(&params.a, &Expr::zero()).unwrap());
    let schwarzschild = schwarzschild_metric(&m, &r, &t).unwrap();

    assert!(reduced.equivalent_to(&schwarzschild));
}

#[test]
fn test_kerr_line_element_round_trip() {
    let params = Params::new();
    let coords = vec![Symbol::new("t"), params.r.clone(), params.t.clone(), Symbol::new("φ")];
    let g = params.kerr();

    let ds = line_element_from_metric(&g, &coords).unwrap();
    let recovered = metric_from_line_element(&ds, &coords).unwrap();

    assert!(recovered.equivalent_to(&g));
}

#[test]
fn test_kerr_inverse() {
    let params = Params::new();
    let g = params.kerr();
    let guu = inverse(&g).unwrap();

    let product = Array2::from_shape_fn((4, 4), |(i, j)| {
        (0..4).map(|k| &guu[[i, k]] * &g[[k, j]]).sum::<Expr>()
    });
    assert!(product.equivalent_to(&Array2::eye(4)));

    // the t-φ block stays coupled, r and θ decouple
    assert!(!guu[[0, 3]].simplify().is_zero());
    assert!(guu[[1, 1]].equivalent(&g[[1, 1]].recip().unwrap()));
    assert!(guu[[2, 2]].equivalent(&g[[2, 2]].recip().unwrap()));
}
