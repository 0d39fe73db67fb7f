// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundationdevices.com>
// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg_attr(not(test), no_std)]

pub mod aes;
#[cfg(feature = "firmware")]
pub mod caravel;
pub mod error;
pub mod firmware;
#[cfg(feature = "logging")]
pub mod logging;
pub mod monitor;
pub mod sequence;
pub mod status;
pub mod vgpio;
