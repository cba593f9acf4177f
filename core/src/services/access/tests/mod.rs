//! Tests for access code lifecycle services
