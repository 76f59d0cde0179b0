pub mod stub_tool;
