//! Pseudo-assembly emitted for each statement.
//!
//! The target is an accumulator machine. Every statement lowers to a short
//! block of instructions terminated by a separator line:
//!
//! ```text
//! x = 10 + 5;      LOAD 10          ; accumulator <= 10
//!                  ADD 5            ; accumulator <= accumulator + 5
//!                  STORE x          ; x <= accumulator
//!                  ----------------
//!
//! print x;         PUSH x
//!                  CALL PRINT
//!                  ----------------
//! ```
//!
//! Nothing here executes the instructions; they are illustrative output only.

use std::fmt;
use std::io::{self, Write};

pub const SEPARATOR: &str = "----------------";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    Load(String),
    Add(String),
    Store(String),
    Push(String),
    CallPrint,
    Separator,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;
        match self {
            Load(val)  => write!(f, "LOAD {}", val),
            Add(val)   => write!(f, "ADD {}", val),
            Store(var) => write!(f, "STORE {}", var),
            Push(var)  => write!(f, "PUSH {}", var),
            CallPrint  => write!(f, "CALL PRINT"),
            Separator  => write!(f, "{}", SEPARATOR),
        }
    }
}

/// Lowers `target = left + right;`.
pub fn assignment(target: &str, left: &str, right: &str) -> Vec<Instruction> {
    vec![
        Instruction::Load(left.to_owned()),
        Instruction::Add(right.to_owned()),
        Instruction::Store(target.to_owned()),
        Instruction::Separator,
    ]
}

/// Lowers `print target;`.
pub fn print(target: &str) -> Vec<Instruction> {
    vec![
        Instruction::Push(target.to_owned()),
        Instruction::CallPrint,
        Instruction::Separator,
    ]
}

/// A backend the parser hands each recognized statement to, in source order.
///
/// Rendering a statement cannot fail; only the sink behind an emitter can.
pub trait Emitter {
    fn emit_assignment(&mut self, target: &str, left: &str, right: &str) -> io::Result<()>;
    fn emit_print(&mut self, target: &str) -> io::Result<()>;
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    fn emit_assignment(&mut self, target: &str, left: &str, right: &str) -> io::Result<()> {
        (**self).emit_assignment(target, left, right)
    }

    fn emit_print(&mut self, target: &str) -> io::Result<()> {
        (**self).emit_print(target)
    }
}

// Feeds every statement to both backends, first then second.
impl<A: Emitter, B: Emitter> Emitter for (A, B) {
    fn emit_assignment(&mut self, target: &str, left: &str, right: &str) -> io::Result<()> {
        self.0.emit_assignment(target, left, right)?;
        self.1.emit_assignment(target, left, right)
    }

    fn emit_print(&mut self, target: &str) -> io::Result<()> {
        self.0.emit_print(target)?;
        self.1.emit_print(target)
    }
}

/// Writes instruction text, one instruction per line, straight to `W`.
pub struct PseudoAsm<W: Write> {
    out: W,
}

impl<W: Write> PseudoAsm<W> {
    pub fn new(out: W) -> Self {
        PseudoAsm { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, block: &[Instruction]) -> io::Result<()> {
        for ins in block {
            writeln!(self.out, "{}", ins)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Emitter for PseudoAsm<W> {
    fn emit_assignment(&mut self, target: &str, left: &str, right: &str) -> io::Result<()> {
        self.write_block(&assignment(target, left, right))
    }

    fn emit_print(&mut self, target: &str) -> io::Result<()> {
        self.write_block(&print(target))
    }
}

/// One statement and the instructions it lowered to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    pub source: String,
    pub instructions: Vec<Instruction>,
}

/// Keeps every emitted block in memory.
#[derive(Default, Debug)]
pub struct Listing {
    blocks: Vec<Block>,
}

impl Listing {
    pub fn new() -> Self {
        Listing::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// All emitted lines in order.
    pub fn lines(&self) -> Vec<String> {
        self.blocks
            .iter()
            .flat_map(|b| b.instructions.iter().map(|ins| ins.to_string()))
            .collect()
    }
}

impl Emitter for Listing {
    fn emit_assignment(&mut self, target: &str, left: &str, right: &str) -> io::Result<()> {
        self.blocks.push(Block {
            source: format!("{} = {} + {};", target, left, right),
            instructions: assignment(target, left, right),
        });
        Ok(())
    }

    fn emit_print(&mut self, target: &str) -> io::Result<()> {
        self.blocks.push(Block {
            source: format!("print {};", target),
            instructions: print(target),
        });
        Ok(())
    }
}
