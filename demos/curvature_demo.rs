use einstein::prelude::*;
use ndarray::Array2;
use tracing_subscriber::EnvFilter;

fn print_matrix(label: &str, m: &Array2<Expr>) {
    println!("{}:", label);
    for ((i, j), entry) in m.indexed_iter() {
        if !entry.is_zero() {
            println!("  [{}][{}] = {}", i, j, entry);
        }
    }
    println!();
}

fn main() -> Result<()> {
    // RUST_LOG=einstein=debug shows the stage spans
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== 2-Sphere of radius r0 ===\n");

    let coords = symbols("θ φ");
    let r0 = Expr::symbol(&Symbol::new("r0"));
    let theta = Expr::symbol(&coords[0]);
    let g = sphere_metric(&r0, &theta);

    let geometry = Geometry::new(g, coords.clone())?;
    println!("ds² = {}\n", geometry.line_element()?);
    print_matrix("Inverse metric g^μν", &inverse(geometry.metric())?);

    let cc = christoffel_second_kind(geometry.metric(), &coords)?;
    println!("Christoffel symbols Γ^α_μν:");
    for ((a, u, v), entry) in cc.indexed_iter() {
        if !entry.is_zero() {
            println!("  Γ^{}_{}{} = {}", coords[a], coords[u], coords[v], entry.simplify());
        }
    }
    println!();

    print_matrix("Ricci tensor R_μν", &ricci(geometry.metric(), &coords)?);
    println!("Ricci scalar R = {}\n", ricci_scalar(geometry.metric(), &coords)?);

    println!("=== Schwarzschild exterior ===\n");

    let coords = symbols("t r θ φ");
    let m = Expr::symbol(&Symbol::new("M"));
    let r = Expr::symbol(&coords[1]);
    let theta = Expr::symbol(&coords[2]);
    let geometry = Geometry::new(schwarzschild_metric(&m, &r, &theta)?, coords)?;
    let curvature = geometry.curvature()?;

    println!("Flat:        {}", curvature.is_flat());
    println!("Ricci-flat:  {}", curvature.is_ricci_flat());
    println!("R = {}\n", curvature.ricci_scalar);

    println!("=== Flat FLRW with scale factor a(t) ===\n");

    let coords = symbols("t x y z");
    let a = Function::new("a").call(&[Expr::symbol(&coords[0])]);
    let mut g = Array2::<Expr>::eye(4).map(|e| e * a.pow(2));
    g[[0, 0]] = Expr::int(-1);
    println!("R = {}\n", ricci_scalar(&g, &coords)?);

    println!("=== Kerr metric (Boyer-Lindquist) ===\n");

    let [m, a, r, t] = ["M", "a", "r", "T"].map(|n| Expr::symbol(&Symbol::new(n)));
    let kerr = kerr_metric(&m, &a, &r, &t)?;
    print_matrix("Covariant metric g_μν", &kerr);

    let ds = line_element_from_metric(&kerr, &symbols("t r T φ"))?;
    let recovered = metric_from_line_element(&ds, &symbols("t r T φ"))?;
    if recovered.equivalent_to(&kerr) {
        println!("✓ Line element round trip recovers the Kerr metric");
    }

    Ok(())
}
