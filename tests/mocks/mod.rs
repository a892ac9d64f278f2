mod mock_user_directory;

pub use mock_user_directory::MockUserDirectory;
