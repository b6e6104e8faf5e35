//! Realtime presence and relay tests

mod websocket_tests;
