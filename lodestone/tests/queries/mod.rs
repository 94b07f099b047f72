pub mod add_service_link;
