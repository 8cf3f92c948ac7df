// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Random expression generator
//!
//! Produces well-formed expression trees that always evaluate successfully:
//! subtractions never go negative, divisors are never zero and intermediate
//! values stay within `i64`.

use crate::ast::{Operator, XmlNode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum operator nesting below the root
    pub max_depth: usize,
    /// Largest literal emitted
    pub max_literal: i64,
    /// Seed for reproducible output
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_literal: 20,
            seed: None,
        }
    }
}

/// A generated expression together with its value
#[derive(Debug, Clone)]
pub struct Generated {
    pub body: XmlNode,
    pub value: i64,
}

impl Generated {
    /// The expression wrapped in an `<expression>` document root
    pub fn document(&self) -> XmlNode {
        XmlNode::expression(self.body.clone())
    }
}

/// Random expression generator
pub struct ExpressionGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl ExpressionGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Generate one expression
    pub fn generate(&mut self) -> Generated {
        self.generate_at(0)
    }

    fn generate_at(&mut self, depth: usize) -> Generated {
        if depth >= self.config.max_depth || self.rng.gen_bool(0.25) {
            return self.generate_literal(0);
        }

        let op = Operator::BINARY[self.rng.gen_range(0..Operator::BINARY.len())];
        let left = self.generate_at(depth + 1);
        let right = self.generate_at(depth + 1);

        match op {
            Operator::Minus if left.value < right.value => combine(op, right, left),
            Operator::Divide if right.value == 0 => {
                let divisor = self.generate_literal(1);
                combine(op, left, divisor)
            }
            _ => combine(op, left, right),
        }
    }

    fn generate_literal(&mut self, min: i64) -> Generated {
        let value = self.rng.gen_range(min..=self.config.max_literal.max(min));
        Generated {
            body: XmlNode::number(value),
            value,
        }
    }
}

/// Build `left op right`, falling back to the left operand alone when the
/// result would not fit in an `i64`.
fn combine(op: Operator, left: Generated, right: Generated) -> Generated {
    let value = match op {
        Operator::Plus => left.value.checked_add(right.value),
        Operator::Minus => left.value.checked_sub(right.value),
        Operator::Times => left.value.checked_mul(right.value),
        Operator::Divide => left.value.checked_div(right.value),
        Operator::Number => None,
    };

    match value {
        Some(value) => Generated {
            body: XmlNode::binary(op, left.body, right.body),
            value,
        },
        None => left,
    }
}
