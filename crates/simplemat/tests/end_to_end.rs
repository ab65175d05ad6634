//! End-to-end usage through the facade crate.

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use simplemat::prelude::*;

#[test]
fn test_linear_regression_workflow() {
    // Fit y = c0 + c1 * t + c2 * t^2 to exact quadratic data.
    let ts = [0.0, 1.0, 2.0, 3.0, 4.0];
    let mut design = SimpleMatrix::<f64>::zeros(ts.len(), 3);
    let mut y = SimpleMatrix::<f64>::zeros(ts.len(), 1);
    for (i, &t) in ts.iter().enumerate() {
        design.set_row(i, 0, &[1.0, t, t * t]).unwrap();
        y.set_row(i, 0, &[2.0 - t + 0.5 * t * t]).unwrap();
    }

    let coeffs = design.solve(&y).unwrap().expect("full column rank");
    assert_eq!(coeffs.shape(), (3, 1));
    assert_relative_eq!(coeffs.get(0, 0).unwrap(), 2.0, epsilon = 1e-9);
    assert_relative_eq!(coeffs.get(1, 0).unwrap(), -1.0, epsilon = 1e-9);
    assert_relative_eq!(coeffs.get(2, 0).unwrap(), 0.5, epsilon = 1e-9);

    // Normal equations give the same answer through the pseudo-inverse.
    let pinv = design.pseudo_inverse().unwrap();
    let via_pinv = pinv.mult(&y).unwrap();
    let diff = via_pinv.minus(&coeffs).unwrap();
    assert!(diff.element_max_abs() < 1e-9);
}

#[test]
fn test_single_precision_pipeline() {
    let a = SimpleMatrix::<f32>::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
    let inv = a.invert().unwrap().expect("invertible");
    let identity = a.mult(&inv).unwrap();
    assert_relative_eq!(*identity.matrix(), DenseMatrix::identity(2), epsilon = 1e-6);

    let cond = a.condition_p2().unwrap();
    assert!(cond > 1.0 && cond.is_finite());

    let scaled = a.scale(0.1).unwrap();
    assert_eq!(scaled.get(0, 0), Some(f64::from(2.0f32 * 0.1f64 as f32)));
}

#[test]
fn test_elementwise_chain() {
    let a = SimpleMatrix::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    let roundtrip = a.element_log().unwrap().element_exp().unwrap();
    assert_relative_eq!(*roundtrip.matrix(), *a.matrix(), epsilon = 1e-12);

    let squared = a.element_power_scalar(2.0).unwrap();
    let product = a.element_mult(&a).unwrap();
    assert_relative_eq!(*squared.matrix(), *product.matrix(), epsilon = 1e-12);

    let halves = a.element_div(&a.plus(&a).unwrap()).unwrap();
    assert_eq!(halves.element_sum(), 2.0);

    let shifted = a.plus_scalar(1.0).unwrap().minus_scalar(1.0).unwrap();
    assert_eq!(shifted, a);

    let lerp = a.plus_scaled(0.5, &a.negative().unwrap()).unwrap();
    assert_eq!(lerp, a.divide(2.0).unwrap());
}

#[test]
fn test_blocks_and_display() {
    let a = SimpleMatrix::<f64>::from_wide(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
    let block = a.extract(1..3, 1..3).unwrap();
    assert_eq!(block, SimpleMatrix::from_rows(&[[5.0, 6.0], [8.0, 9.0]]).unwrap());

    let k = SimpleMatrix::<f64>::identity(2).kron(&block).unwrap();
    assert_eq!(k.shape(), (4, 4));
    assert_eq!(k.trace().unwrap(), 28.0);

    let text = block.to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Type = DDRM , rows = 2 , cols = 2"));
    assert_eq!(lines.count(), 2);

    assert!(a.extract(2..4, 0..1).unwrap_err().is_shape_error());
}

#[test]
fn test_dot_and_wide_systems() {
    let u = SimpleMatrix::<f64>::from_rows(&[[1.0, 2.0, 2.0]]).unwrap();
    assert_eq!(u.dot(&u.transpose().unwrap()).unwrap(), 9.0);
    assert_relative_eq!(u.norm_f().unwrap(), 3.0, epsilon = 1e-12);

    let b = SimpleMatrix::<f64>::from_rows(&[[1.0]]).unwrap();
    assert!(u.solve(&b).unwrap().is_none());
}
