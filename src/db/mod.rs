//! # Database Module
//!
//! This module organizes all database-related code into submodules:
//! - `models`: Data structures (User, Post)
//! - `users`: CRUD operations for user accounts
//! - `posts`: CRUD operations for blog posts

pub mod models;
pub mod posts;
pub mod users;
