use crate::cursor::RandomAccessIterator;

/// Copy `[first, last)` to the range starting at `result`, front to back.
/// Returns the end of the output range.
///
/// # Safety
///
/// `[first, last)` must be valid, the output range must be valid for
/// `last - first` elements, and the output may only overlap the input if it
/// starts at or before `first`.
pub unsafe fn copy<I, O>(first: I, last: I, result: O) -> O
where
    I: RandomAccessIterator,
    O: RandomAccessIterator<Value = I::Value>,
{
    let n = last.distance(&first);
    // SAFETY: forwarded to the caller.
    return unsafe { copy_n(first, n, result) };
}

/// Copy `n` elements starting at `first` to the range starting at `result`.
/// Returns the end of the output range. Does nothing when `n <= 0`.
///
/// # Safety
///
/// Both ranges must be valid for `n` elements, and the output may only
/// overlap the input if it starts at or before `first`.
pub unsafe fn copy_n<I, O>(first: I, n: isize, result: O) -> O
where
    I: RandomAccessIterator,
    O: RandomAccessIterator<Value = I::Value>,
{
    let mut src = first;
    let mut dst = result;
    for _ in 0..n.max(0) {
        // SAFETY: forwarded to the caller.
        unsafe { dst.write(src.read()) };
        src.advance(1);
        dst.advance(1);
    }
    return dst;
}

/// Copy `[first, last)` to the range ending at `d_last`, back to front.
/// Returns the start of the output range.
///
/// # Safety
///
/// `[first, last)` must be valid, the output range must be valid for
/// `last - first` elements before `d_last`, and the output may only overlap
/// the input if it ends at or after `last`.
pub unsafe fn copy_backward<I, O>(first: I, last: I, d_last: O) -> O
where
    I: RandomAccessIterator,
    O: RandomAccessIterator<Value = I::Value>,
{
    let mut src = last;
    let mut dst = d_last;
    while first < src {
        src.advance(-1);
        dst.advance(-1);
        // SAFETY: forwarded to the caller.
        unsafe { dst.write(src.read()) };
    }
    return dst;
}

/// Reverse `[first, last)` in place.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub unsafe fn reverse<I: RandomAccessIterator>(first: I, last: I) {
    let mut lo = first;
    let mut hi = last;
    while lo < hi {
        hi.advance(-1);
        if !(lo < hi) {
            break;
        }
        // SAFETY: both positions lie inside the range.
        unsafe { lo.swap(&hi) };
        lo.advance(1);
    }
}

/// Rotate `[first, last)` so that `middle` becomes the first element.
/// Returns the new position of the element that was at `first`.
///
/// # Safety
///
/// `[first, middle)` and `[middle, last)` must be valid ranges.
pub unsafe fn rotate<I: RandomAccessIterator>(first: I, middle: I, last: I) -> I {
    if first == middle {
        return last;
    }
    if middle == last {
        return first;
    }
    // SAFETY: forwarded to the caller.
    unsafe {
        reverse(first, middle);
        reverse(middle, last);
        reverse(first, last);
    }
    return first.offset(last.distance(&middle));
}
