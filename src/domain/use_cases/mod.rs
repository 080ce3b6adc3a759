// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod complete_review;
pub mod error;
pub mod start_review;
pub mod submit_track;
