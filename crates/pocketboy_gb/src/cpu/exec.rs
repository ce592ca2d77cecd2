//! Handlers for the unprefixed opcode table.
//!
//! Every handler has the [`Handler`](super::Handler) shape: it receives the
//! opcode it was dispatched for, decodes any operand fields from it, and
//! returns whether a conditional branch was taken so `step` can pick the
//! right cycle cost.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
