//! Request serializer
//!
//! Encodes a staged command into the wire block format.

/// Encode a request into the provided buffer.
///
/// For each argument (argument 0 is the command verb) this emits
/// `<decimal-len>\n<bytes>\n`, then a single empty line terminating the
/// request. Arguments are opaque byte strings; embedded newlines and NUL
/// bytes survive verbatim because the framing is byte-counted, not
/// line-escaped.
pub fn encode_request<A: AsRef<[u8]>>(args: &[A], out: &mut Vec<u8>) {
    for arg in args {
        let arg = arg.as_ref();
        push_decimal(out, arg.len());
        out.push(b'\n');
        out.extend_from_slice(arg);
        out.push(b'\n');
    }
    out.push(b'\n');
}

/// Write a usize as ASCII decimal digits without heap allocation
fn push_decimal(out: &mut Vec<u8>, mut value: usize) {
    let mut digits = [0u8; 20];
    let mut count = 0;
    if value == 0 {
        out.push(b'0');
        return;
    }
    while value > 0 {
        digits[count] = b'0' + (value % 10) as u8;
        value /= 10;
        count += 1;
    }
    for idx in (0..count).rev() {
        out.push(digits[idx]);
    }
}
