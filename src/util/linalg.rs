use crate::Complex;

pub(crate) fn convolve_1d(input: &[Complex], kernel: &[Complex]) -> Vec<Complex> {
    let input_len = input.len();
    let kernel_len = kernel.len();

    debug_assert!(input_len > 0 && kernel_len > 0);
    let output_len = input_len + kernel_len - 1;

    let mut output = vec![Complex::ZERO; output_len];

    for (i, out) in output.iter_mut().enumerate() {
        let mut sum = Complex::ZERO;
        for (j, k) in kernel.iter().enumerate() {
            // only the kernel taps that overlap the input contribute
            if j <= i && i - j < input_len {
                sum = sum + input[i - j] * *k;
            }
        }
        *out = sum;
    }
    output
}

#[cfg(test)]
mod test {
    use super::convolve_1d;

    #[test]
    fn convolve_lengths() {
        let a = [complex!(1.0), complex!(1.0)];
        let b = [complex!(1.0), complex!(2.0), complex!(1.0)];
        let out = convolve_1d(&a, &b);
        assert_eq!(
            out,
            vec![complex!(1.0), complex!(3.0), complex!(3.0), complex!(1.0)]
        );
    }

    #[test]
    fn convolve_single() {
        let out = convolve_1d(&[complex!(2.0, 1.0)], &[complex!(0.0, 1.0)]);
        assert_eq!(out, vec![complex!(-1.0, 2.0)]);
    }
}
