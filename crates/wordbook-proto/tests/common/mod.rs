pub mod mock_dictionary;
