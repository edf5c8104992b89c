mod todo_agent_test;
