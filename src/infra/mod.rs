//! Hardware-facing building blocks: interface register access and the
//! codecs turning frames into DCAN register words.
pub mod codec;
pub mod registers;
