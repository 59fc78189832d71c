// Test modules for Finbook
// Each module contains unit tests for the corresponding source file

mod api_tests;
mod tui_tests;
