/// Shortest representation which reads back to the same `f64`, in the notation of Python's `repr`:
/// decimal with at least one fractional digit between `1e-4` and `1e16`, scientific outside of it with a
/// signed exponent of at least two digits (`1e-05`, `2.5e+16`).
pub fn float_to_repr(x: f64) -> String {
  if x.is_nan() {
    return "nan".to_owned();
  }

  let repr = format!("{x:?}");
  match repr.split_once('e') {
    Some((mantissa, exponent)) => {
      let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
      };
      format!("{mantissa}e{sign}{digits:0>2}")
    }
    None => repr,
  }
}
