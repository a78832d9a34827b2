pub mod extension_service;
