mod node_stats_tests;
