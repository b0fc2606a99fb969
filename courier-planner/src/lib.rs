//! Route planners for the courier delivery engine.
//!
//! This crate provides [`NearestNeighbourPlanner`], the default
//! implementation of the [`RoutePlanner`](courier_core::RoutePlanner) trait.
//! It orders each vehicle's fixed load greedily by road distance from the
//! vehicle's current position. Planning is pure: it reads the package store
//! and distance index and only decides the order of the load.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod nearest;

pub use nearest::NearestNeighbourPlanner;
