// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.

//! End-to-end tests for the dataset pipeline live in `tests/`.
