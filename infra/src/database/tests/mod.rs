mod message_repository_tests;
