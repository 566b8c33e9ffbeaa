//! Unit tests for attribute parsing and type classification.

mod type_utils;
