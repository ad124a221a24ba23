// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides the notification channel used to surface population progress.
//!
//! Agents publish what happened (a model loaded, a load failed, a session settled)
//! on an [`EventBus`]; the application drains it once per frame to update status
//! text or logs. Keeping the bus generic lets higher-level crates define their own
//! event enums without `menagerie-core` knowing about them.

mod bus;

pub use self::bus::EventBus;
