/// An error occurring during the codec process.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// An error occurring at the decoding state.
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    /// An error occurring at the encoding or estimation state.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// An error occurring during the decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodingError {
    /// The codec version is not supported.
    #[error("unsupported codec version {0}")]
    UnsupportedCodecVersion(u8),
    /// The buffer ended before all the expected fields were read.
    #[error("end of file")]
    Eof,
}

/// An error occurring during the encoding of a batch or the estimation of its commit cost.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// The batch does not contain any chunk.
    #[error("batch contains no chunks")]
    EmptyBatch,
    /// A chunk of the batch does not contain any block.
    #[error("chunk contains no blocks")]
    EmptyChunk,
    /// A chunk contains more blocks than the block count prefix can represent.
    #[error("too many blocks in chunk: got {0}, max {max}", max = u8::MAX)]
    TooManyBlocks(usize),
    /// The batch contains more chunks than the codec supports.
    #[error("too many chunks in batch: got {got}, max {max}")]
    TooManyChunks {
        /// The number of chunks in the batch.
        got: usize,
        /// The maximum number of chunks supported.
        max: usize,
    },
    /// A transaction is larger than its length prefix can represent.
    #[error("transaction of {0} bytes exceeds the maximum encodable length")]
    TransactionTooLarge(usize),
}
