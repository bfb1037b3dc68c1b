//! Mass-spring cloth simulation.
//!
//! `drape` turns a rectangular grid into a network of point masses joined by
//! structural and shear springs, then advances it with semi-implicit Euler
//! under gravity, quadratic air drag and an optional perturbation: wind, or
//! a static sphere the cloth drapes over. Rendering stays outside the crate;
//! the grid hands over its rest pose once and receives live positions every
//! tick.
//!
//! # Features
//!
//! - **Topology builder**: 8-connected springs, each neighbor pair once
//! - **Step integrator**: gravity, drag, Hookean springs, wind or sphere projection
//! - **Geometry sync**: write-through of positions via the `PositionSink` trait
//! - **Fixed-timestep driver**: catch-up loop with an overrun guard
//! - **Observable**: Monitor ticks via the `StepObserver` trait, or log them
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod grid;
pub mod perturbation;
pub mod cloth;
pub mod stepper;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use spring::{Spring, SpringKind};
pub use grid::{GridGeometry, PositionSink, RectGrid, Topology};
pub use perturbation::{Perturbation, PerturbationKind, Sphere, Wind};
pub use cloth::ClothSimulator;
pub use stepper::FixedStepper;
pub use config::{Anchors, ClothConfig, ForceOrdering};
pub use observer::{LogObserver, NoOpStepObserver, StepObserver};
pub use error::ClothError;
