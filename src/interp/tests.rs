use super::*;
use crate::config::InterpConfig;
use crate::coord::BruteForceLocator;
use crate::grid::GridTables;
use crate::topology::Topology;
use ndarray::{array, Array1, Array2, ArrayD, IxDyn};

fn flat_grid(ny: usize, nx: usize) -> Grid {
    let xc = Array2::from_shape_fn((ny, nx), |(_, i)| i as f64);
    let yc = Array2::from_shape_fn((ny, nx), |(j, _)| j as f64);
    let ones = Array2::ones((ny, nx));
    let zeros = Array2::zeros((ny, nx));
    Grid::new(GridTables {
        xc: xc.clone(),
        yc: yc.clone(),
        xg: xc,
        yg: yc,
        dx_c: ones.clone(),
        dy_c: ones.clone(),
        dx_g: ones.clone(),
        dy_g: ones.clone(),
        cs: ones,
        sn: zeros,
        dr_c: array![1.0, 1.0],
        dr_f: array![1.0, 1.0],
        z: array![-0.5, -1.5],
        zl: array![0.0, -1.0],
        time: array![0.0, 1.0],
        mask_c: Array1::ones(2 * ny * nx)
            .into_shape((2, ny, nx))
            .expect("reshape"),
        topology: Topology::single_face(ny as i64, nx as i64),
    })
}

#[test]
fn scalar_field_reproduces_linear_profile() {
    let ny = 8;
    let nx = 8;
    let grid = flat_grid(ny, nx);

    // f(x, y) = x + 2*y, sampled at cell centers; identical on both
    // vertical layers so the result doesn't depend on vertical weighting.
    let mut data = ArrayD::zeros(IxDyn(&[2, ny, nx]));
    for z in 0..2 {
        for j in 0..ny {
            for i in 0..nx {
                data[[z, j, i]] = i as f64 + 2.0 * j as f64;
            }
        }
    }
    let mut fields = FieldTable::new();
    fields.insert("F", FieldDescriptor::Scalar3D, data);

    let xc: Vec<f64> = (0..ny * nx).map(|n| (n % nx) as f64).collect();
    let yc: Vec<f64> = (0..ny * nx).map(|n| (n / nx) as f64).collect();
    let dx = vec![1.0; ny * nx];
    let dy = vec![1.0; ny * nx];
    let cs = vec![1.0; ny * nx];
    let sn = vec![0.0; ny * nx];
    let locator = BruteForceLocator::new(&xc, &yc, &dx, &dy, &cs, &sn, ny, nx);

    let interp = Interpolator::new(&grid, &fields, InterpConfig::default());
    let got = interp
        .interpolate_scalar("F", &locator, 4.25, 4.25, -1.0, 0.0)
        .expect("ok");

    assert!((got - (4.25 + 2.0 * 4.25)).abs() < 1e-8, "got {got}");
}

#[test]
fn vector_field_rotates_to_geographic_frame() {
    let ny = 6;
    let nx = 6;
    let (cs, sn) = (0.6, 0.8); // local grid rotated relative to (east, north)

    let xc = Array2::from_shape_fn((ny, nx), |(_, i)| i as f64);
    let yc = Array2::from_shape_fn((ny, nx), |(j, _)| j as f64);
    let ones = Array2::ones((ny, nx));
    let grid = Grid::new(GridTables {
        xc: xc.clone(),
        yc: yc.clone(),
        xg: xc,
        yg: yc,
        dx_c: ones.clone(),
        dy_c: ones.clone(),
        dx_g: ones.clone(),
        dy_g: ones.clone(),
        cs: Array2::from_elem((ny, nx), cs),
        sn: Array2::from_elem((ny, nx), sn),
        dr_c: array![1.0, 1.0],
        dr_f: array![1.0, 1.0],
        z: array![-0.5, -1.5],
        zl: array![0.0, -1.0],
        time: array![0.0, 1.0],
        mask_c: Array1::ones(2 * ny * nx)
            .into_shape((2, ny, nx))
            .expect("reshape"),
        topology: Topology::single_face(ny as i64, nx as i64),
    });

    let u_data = ArrayD::ones(IxDyn(&[2, 2, ny, nx]));
    let v_data = ArrayD::zeros(IxDyn(&[2, 2, ny, nx]));
    let mut fields = FieldTable::new();
    fields.insert("UVEL", FieldDescriptor::VelocityU, u_data);
    fields.insert("VVEL", FieldDescriptor::VelocityV, v_data);

    let xcv: Vec<f64> = (0..ny * nx).map(|n| (n % nx) as f64).collect();
    let ycv: Vec<f64> = (0..ny * nx).map(|n| (n / nx) as f64).collect();
    let dxv = vec![1.0; ny * nx];
    let dyv = vec![1.0; ny * nx];
    let csv = vec![cs; ny * nx];
    let snv = vec![sn; ny * nx];
    let locator = BruteForceLocator::new(&xcv, &ycv, &dxv, &dyv, &csv, &snv, ny, nx);

    let interp = Interpolator::new(&grid, &fields, InterpConfig::default());
    let (east, north) = interp
        .interpolate_vector("UVEL", "VVEL", &locator, 3.0, 3.0, -1.0, 0.0)
        .expect("ok");

    // (u, v) = (1, 0) everywhere; vec_transform rotates to (u*cs - v*sn,
    // u*sn + v*cs) = (cs, sn), matching local_to_latlon's ground truth.
    assert!((east - cs).abs() < 1e-8, "east {east}");
    assert!((north - sn).abs() < 1e-8, "north {north}");
}

#[test]
fn unknown_field_errors() {
    let grid = flat_grid(4, 4);
    let fields = FieldTable::new();
    let xc = vec![0.0; 16];
    let yc = vec![0.0; 16];
    let dx = vec![1.0; 16];
    let dy = vec![1.0; 16];
    let cs = vec![1.0; 16];
    let sn = vec![0.0; 16];
    let locator = BruteForceLocator::new(&xc, &yc, &dx, &dy, &cs, &sn, 4, 4);
    let interp = Interpolator::new(&grid, &fields, InterpConfig::default());

    let err = interp
        .interpolate_scalar("MISSING", &locator, 0.0, 0.0, -1.0, 0.0)
        .unwrap_err();
    assert_eq!(err, InterpError::FieldNotFound);
}
