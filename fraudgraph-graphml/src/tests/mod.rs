//! Tests covering GraphML encoding, decoding, and file helpers.
