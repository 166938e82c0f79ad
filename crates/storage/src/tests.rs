mod adapter_tests;
mod remote_tests;
