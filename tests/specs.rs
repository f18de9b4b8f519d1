// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Warden Authors

//! Workspace-level integration specs for the agent supervisor.

mod specs {
    mod lifecycle;
    mod supervision;
}
