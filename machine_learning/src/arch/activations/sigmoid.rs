/// The logistic activation function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// Evaluates `1 / (1 + e^-z)`.
    ///
    /// The exponent is always taken over a non positive number so it never overflows, very
    /// large magnitudes saturate to exactly `0.0` or `1.0` instead.
    pub fn f(z: f64) -> f64 {
        if z >= 0. {
            1. / (1. + (-z).exp())
        } else {
            let e = z.exp();
            e / (1. + e)
        }
    }

    /// The derivative of the sigmoid expressed in terms of its output `a = f(z)`.
    pub fn df_from_output(a: f64) -> f64 {
        a * (1. - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_one_half() {
        assert_eq!(Sigmoid::f(0.), 0.5);
    }

    #[test]
    fn symmetric() {
        for z in [0.1, 1., 3.5, 10.] {
            let diff = Sigmoid::f(z) + Sigmoid::f(-z) - 1.;
            assert!(diff.abs() < 1e-6, "z = {z}, diff = {diff}");
        }
    }

    #[test]
    fn saturates_without_nan() {
        assert_eq!(Sigmoid::f(1e4), 1.);
        assert_eq!(Sigmoid::f(-1e4), 0.);
        assert!(!Sigmoid::f(f64::MAX).is_nan());
        assert!(!Sigmoid::f(f64::MIN).is_nan());
    }

    #[test]
    fn moderate_inputs_do_not_saturate() {
        for z in [17., 20., 30.] {
            assert!(Sigmoid::f(z) < 1., "z = {z}");
            assert!(Sigmoid::f(-z) > 0., "z = -{z}");
        }
    }

    #[test]
    fn derivative_peaks_at_one_half() {
        assert_eq!(Sigmoid::df_from_output(0.5), 0.25);
        assert_eq!(Sigmoid::df_from_output(1.), 0.);
    }
}
