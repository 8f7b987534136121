use rayon::prelude::*;

/// Sets each element to the same value.
/// `chunk_size` is break the work into tasks for multi-threading.
pub fn set_value(a_slice: &mut [f64], value: f64, chunk_size: usize) {
    a_slice
        .par_chunks_mut(chunk_size.max(1))
        .for_each(|a_chunk: &mut [f64]| {
            for a in a_chunk {
                *a = value;
            }
        });
}

/// Copy `src` into `dst`, both must have the same length.
pub fn copy(src: &[f64], dst: &mut [f64], chunk_size: usize) {
    debug_assert_eq!(src.len(), dst.len());
    let chunk_size = chunk_size.max(1);
    dst.par_chunks_mut(chunk_size)
        .zip(src.par_chunks(chunk_size))
        .for_each(|(d_chunk, s_chunk)| {
            d_chunk.copy_from_slice(s_chunk);
        });
}
