pub mod frontend_handlers;
